use std::path::PathBuf;

use ilpack_bytecode::{Module, dump};

pub struct DumpArgs {
    pub module_path: PathBuf,
}

pub fn run(args: DumpArgs) {
    let module = match Module::from_path(&args.module_path) {
        Ok(module) => module,
        Err(e) => {
            eprintln!("error: {}: {}", args.module_path.display(), e);
            std::process::exit(1);
        }
    };

    print!("{}", dump(&module));
}
