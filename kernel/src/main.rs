#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

// 只有裸机目标才有内核；宿主机上 (cargo build --workspace) 留一个空壳
#[cfg(target_os = "none")]
mod dtb;
#[cfg(target_os = "none")]
mod finisher;
#[cfg(target_os = "none")]
mod hart;
#[cfg(target_os = "none")]
mod printk;
#[cfg(target_os = "none")]
mod trap;

#[cfg(all(target_os = "none", feature = "tests"))]
mod tests;

#[cfg(target_os = "none")]
use core::panic::PanicInfo;
#[cfg(target_os = "none")]
use driver_uart::Writer;
#[cfg(target_os = "none")]
use hart::MachineHart;
#[cfg(target_os = "none")]
use printk::{ANSI_BLUE, ANSI_RED, ANSI_RESET};
#[cfg(target_os = "none")]
use trap::CYCLE;

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("kernel: bare-metal only, build it with `cargo run -p xtask -- build`");
}

/*
 没有固件：QEMU 以 -bios none 启动，程序从 0x80000000 开始直接跑在 M-mode。

 寄存器约定:
   - $a0 存放当前核的 hartid
   - $a1 存放设备树指针
 除 hart 0 以外的核在 boot.S 里就停住了。
 */
#[cfg(target_os = "none")]
#[unsafe(no_mangle)]
pub extern "C" fn trapcycle_main(hartid: usize, dtb: *const u8) -> ! {
    let dtb_result = dtb::init(dtb);

    let uart_cfg = dtb::uart_config().unwrap_or(driver_uart::DEFAULT_QEMU_VIRT);
    driver_uart::init(uart_cfg);
    finisher::init(dtb::finisher_base().unwrap_or(finisher::DEFAULT_QEMU_VIRT));

    match dtb_result {
        Ok(()) => {
            printk!("Device tree blob at {:p}", dtb);
            printk!("UART in use: base=0x{:x}, thr=0x{:x}, lsr=0x{:x}", uart_cfg.base, uart_cfg.thr_offset, uart_cfg.lsr_offset);
            printk!("{} harts detected, running on hart {}", dtb::hart_count(), hartid);
        }
        Err(err) => {
            printk!("Device tree parsing failed: {:?}", err);
            printk!("Falling back to QEMU-virt defaults");
        }
    }
    printk!("{}trapcycle: machine-mode ecall test{}", ANSI_BLUE, ANSI_RESET);

    let mut hart = MachineHart;
    let mut console = Writer;
    if let Err(err) = CYCLE.configure(&mut hart, trap::vector::machine_vector_addr()) {
        panic!("configure: {}", err);
    }
    if let Err(err) = CYCLE.trigger(&mut hart, &mut console) {
        panic!("trigger: {}", err);
    }
    if let Err(err) = CYCLE.report(&mut console) {
        panic!("report: {}", err);
    }

    #[cfg(feature = "tests")]
    tests::test(&hart);

    finisher::exit(0)
}

#[cfg(target_os = "none")]
#[panic_handler]
pub fn panic(info: &PanicInfo) -> ! {
    printk!("{}PANIC{}: {}", ANSI_RED, ANSI_RESET, info);
    finisher::exit(1)
}
