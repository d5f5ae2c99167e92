// Core module - Session logic independent of the command line
pub mod console;
