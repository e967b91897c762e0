//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("ilpack")
        .about("Pack decoded method bodies into a compact binary format")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(export_command())
        .subcommand(dump_command())
        .subcommand(members_command())
}

/// Export the methods of one namespace.
pub fn export_command() -> Command {
    Command::new("export")
        .about("Export method bodies of one namespace")
        .after_help(
            r#"EXAMPLES:
  ilpack export types.json -n Demo              # writes out.bin
  ilpack export types.json -n Demo -o demo.bin
  RUST_LOG=trace ilpack export types.json -n Demo"#,
        )
        .arg(metadata_path_arg())
        .arg(namespace_arg())
        .arg(output_arg())
}

/// Print the tables and disassembled methods of an exported file.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show strings, blobs and methods of an exported file")
        .arg(module_path_arg())
}

/// List the methods of an exported file.
pub fn members_command() -> Command {
    Command::new("members")
        .about("List exported methods as Namespace.Type::Name")
        .arg(module_path_arg())
}
