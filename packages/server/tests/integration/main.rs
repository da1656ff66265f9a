mod common;

mod archive;
mod catalog;
