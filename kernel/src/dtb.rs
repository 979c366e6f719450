use core::cmp;

use driver_uart::UartConfig;
use fdt::Fdt;
use spin::Once;

#[derive(Debug, Clone, Copy)]
pub struct DeviceTreeInfo {
    uart: Option<UartConfig>,
    finisher: Option<usize>,
    hart_count: usize,
}

impl DeviceTreeInfo {
    fn new(fdt: &Fdt) -> Self {
        Self { uart: parse_uart(fdt), finisher: parse_finisher(fdt), hart_count: parse_hart_count(fdt) }
    }
}

static DEVICE_TREE: Once<DeviceTreeInfo> = Once::new();

pub fn init(dtb: *const u8) -> Result<(), fdt::FdtError> {
    let fdt = unsafe { Fdt::from_ptr(dtb) }?;
    DEVICE_TREE.call_once(|| DeviceTreeInfo::new(&fdt));
    Ok(())
}

pub fn hart_count() -> usize {
    DEVICE_TREE.get().map(|info| info.hart_count).unwrap_or(1)
}

pub fn uart_config() -> Option<UartConfig> {
    DEVICE_TREE.get().and_then(|info| info.uart)
}

pub fn finisher_base() -> Option<usize> {
    DEVICE_TREE.get().and_then(|info| info.finisher)
}

fn first_reg(fdt: &Fdt, compatible: &[&str]) -> Option<usize> {
    let node = fdt.find_compatible(compatible)?;
    let region = node.reg()?.next()?;
    Some(region.starting_address as usize)
}

fn parse_uart(fdt: &Fdt) -> Option<UartConfig> {
    // 优先 /chosen 的 stdout-path，其次任意 ns16550a
    let from_chosen = fdt
        .find_node("/chosen")
        .and_then(|chosen| chosen.property("stdout-path"))
        .and_then(|prop| prop.as_str())
        .map(|path| path.split(':').next().unwrap_or(path))
        .and_then(|path| fdt.find_node(path))
        .and_then(|node| node.reg()?.next())
        .map(|region| region.starting_address as usize);

    from_chosen.or_else(|| first_reg(fdt, &["ns16550a", "ns16550"])).map(UartConfig::new)
}

fn parse_finisher(fdt: &Fdt) -> Option<usize> {
    first_reg(fdt, &["sifive,test1", "sifive,test0"])
}

fn parse_hart_count(fdt: &Fdt) -> usize {
    let count = fdt
        .cpus()
        .filter(|cpu| {
            cpu.property("status").and_then(|prop| prop.as_str()).map(|s| s != "disabled").unwrap_or(true)
        })
        .count();
    cmp::max(count, 1)
}
