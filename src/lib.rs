pub mod median;
mod error;

pub use error::{MedError, MedResult};
pub use median::{Range, RangeStats, RunningMedian, RunningMedianBuilder};

#[cfg(target_os = "linux")]
use jemallocator::Jemalloc;

#[global_allocator]
#[cfg(target_os = "linux")]
static ALLOC: Jemalloc = Jemalloc;
