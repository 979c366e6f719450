pub mod handler;
pub mod vector;

use trapcycle::TrapCycle;

/// 主流程与 trap handler 共享的那一次陷阱周期
pub static CYCLE: TrapCycle = TrapCycle::new();
