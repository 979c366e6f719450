use crate::hart;
use driver_uart::_print;
use spin::Mutex;

static PRINTK_LOCK: Mutex<()> = Mutex::new(());

pub fn _printk(args: core::fmt::Arguments) {
    // 陷阱里不拿锁：被打断的代码可能正持有它
    if hart::nest_count() > 0 {
        _print(args);
        return;
    }
    let _guard = PRINTK_LOCK.lock();
    _print(args);
}

/// Kernel log line. A trailing newline is appended.
#[macro_export]
macro_rules! printk {
    ($fmt:expr) => { $crate::printk::_printk(format_args!(concat!($fmt, "\n"))) };
    ($fmt:expr, $($arg:tt)*) => { $crate::printk::_printk(format_args!(concat!($fmt, "\n"), $($arg)*)) };
}

pub const ANSI_RESET: &str = "\x1b[0m";
pub const ANSI_RED: &str = "\x1b[31m";
pub const ANSI_GREEN: &str = "\x1b[32m";
pub const ANSI_YELLOW: &str = "\x1b[33m";
pub const ANSI_BLUE: &str = "\x1b[34m";
