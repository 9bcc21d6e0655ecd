//! grub-wiz: inspect, validate and edit the GRUB defaults file.
//!
//! A library for round-tripping `/etc/default/grub` without losing
//! comments or layout, and for flagging risky parameter combinations
//! against the machine's disk layout.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod grubfile;
pub mod probe;
pub mod update;
pub mod validate;
pub mod value;
