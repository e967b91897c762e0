use std::fmt::Write as _;
use std::path::PathBuf;

use ilpack_bytecode::Module;

pub struct MembersArgs {
    pub module_path: PathBuf,
}

pub fn run(args: MembersArgs) {
    let module = match Module::from_path(&args.module_path) {
        Ok(module) => module,
        Err(e) => {
            eprintln!("error: {}: {}", args.module_path.display(), e);
            std::process::exit(1);
        }
    };

    print!("{}", list_members(&module));
}

/// One line per method record, in stream order.
pub fn list_members(module: &Module) -> String {
    let mut out = String::new();
    for method in module.methods() {
        let name = module
            .member_name(method.key)
            .unwrap_or_else(|| format!("<{:#018x}>", method.key.0));
        let sig = method.signature;
        writeln!(
            out,
            "{name}({}){}",
            sig.arg_count,
            if sig.returns_value { " -> value" } else { "" }
        )
        .unwrap();
    }
    out
}
