#![cfg_attr(not(test), no_std)]

use core::fmt::{self, Write};
use spin::Once;

/// 16550 寄存器布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub base: usize,
    pub thr_offset: usize,
    pub lsr_offset: usize,
}

impl UartConfig {
    pub const fn new(base: usize) -> Self {
        Self { base, thr_offset: 0, lsr_offset: 5 }
    }
}

pub const DEFAULT_QEMU_VIRT: UartConfig = UartConfig::new(0x1000_0000);

/// THR & TSR empty
const LSR_TX_IDLE: u8 = 1 << 5;

pub struct Uart {
    thr: *mut u8,
    lsr: *const u8,
}

// MMIO 地址本身可以在 hart 之间共享
unsafe impl Send for Uart {}
unsafe impl Sync for Uart {}

impl Uart {
    pub const fn from_config(cfg: UartConfig) -> Self {
        Self {
            thr: (cfg.base + cfg.thr_offset) as *mut u8,
            lsr: (cfg.base + cfg.lsr_offset) as *const u8,
        }
    }

    pub fn putc(&self, byte: u8) {
        unsafe {
            while core::ptr::read_volatile(self.lsr) & LSR_TX_IDLE == 0 {
                core::hint::spin_loop();
            }
            core::ptr::write_volatile(self.thr, byte);
        }
    }

    pub fn puts(&self, s: &str) {
        for b in s.bytes() {
            self.putc(b);
        }
    }
}

static UART: Once<Uart> = Once::new();
static FALLBACK: Uart = Uart::from_config(DEFAULT_QEMU_VIRT);

/// Only the first call takes effect.
pub fn init(cfg: UartConfig) {
    UART.call_once(|| Uart::from_config(cfg));
}

pub fn get() -> &'static Uart {
    UART.get().unwrap_or(&FALLBACK)
}

/// Zero-sized handle implementing [`fmt::Write`] over the global UART.
pub struct Writer;

impl Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        get().puts(s);
        Ok(())
    }
}

pub fn _print(args: fmt::Arguments) {
    let _ = Writer.write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => { $crate::_print(format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! println {
    () => { $crate::print!("\n") };
    ($($arg:tt)*) => { $crate::_print(format_args!("{}\n", format_args!($($arg)*))) };
}
