mod error;
mod properties;
mod single;
