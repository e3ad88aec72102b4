mod config;
mod submission;
