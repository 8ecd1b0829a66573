//! Embassy async tasks
//!
//! Both tasks share the thread-mode executor and yield whenever their
//! hardware is not ready, so neither starves the other.

pub mod echo;
pub mod led_cycle;

pub use echo::echo_task;
pub use led_cycle::led_cycle_task;
