pub mod callbacks;
pub mod scanner_viewmodel;

#[cfg(test)]
mod test_support;

pub use callbacks::{ScanCallbacks, ScanEvent};
pub use scanner_viewmodel::ScannerViewModel;
