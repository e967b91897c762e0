//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Decoded metadata from the disassembler, as JSON (positional).
pub fn metadata_path_arg() -> Arg {
    Arg::new("metadata_path")
        .value_name("METADATA")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Decoded type metadata (JSON)")
}

/// Namespace filter (-n/--namespace).
pub fn namespace_arg() -> Arg {
    Arg::new("namespace")
        .short('n')
        .long("namespace")
        .value_name("NAMESPACE")
        .required(true)
        .help("Export top-level types in exactly this namespace")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .default_value("out.bin")
        .value_parser(value_parser!(PathBuf))
        .help("Output file")
}

/// Exported file to inspect (positional).
pub fn module_path_arg() -> Arg {
    Arg::new("module_path")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Exported file")
}

/// Verbose logging (-v/--verbose).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .global(true)
        .action(ArgAction::SetTrue)
        .help("Log per-type and per-method progress")
}
