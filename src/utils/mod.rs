// Utils module - Utility functions

pub mod duration;
