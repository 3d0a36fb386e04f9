/// Energy-balance calculator.
pub mod balance;
/// Panel-count sweeps over a slider range.
pub mod sweep;
pub mod types;
