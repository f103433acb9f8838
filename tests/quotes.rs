mod common;

#[path = "quotes/offline.rs"]
mod quotes_offline;
#[path = "quotes/retry_synthetic.rs"]
mod quotes_retry_synth;
