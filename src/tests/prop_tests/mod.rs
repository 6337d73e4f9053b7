mod generator;
use generator::*;

use proptest::prelude::*;

use crate::prelude::*;

pub mod dispatch;

pub mod remote;

const CASES: u32 = 256;

/// Host latencies are below 4 polls, so settle waits finish within this many ticks.
const SETTLE_BOUND: u32 = 5;
