pub mod battler;

pub mod buffer;

pub mod decision;

pub mod exec_flags;

pub mod host;
pub mod logging;
pub mod opcode;
pub mod reply;
