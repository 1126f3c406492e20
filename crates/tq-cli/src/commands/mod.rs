pub mod columns;
pub mod dispatch;
pub mod init;
pub mod params;
pub mod resources;
pub mod run;
