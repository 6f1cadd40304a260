//! CLI command implementations.

mod doctor;
mod init;
mod list;
mod run;
mod transcribe;

pub use doctor::run_doctor;
pub use init::run_init;
pub use list::run_list;
pub use run::run_batch_file;
pub use transcribe::run_transcribe;
