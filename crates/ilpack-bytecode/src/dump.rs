//! Human-readable dump of an exported stream.

use std::fmt::Write as _;

use crate::ids::MemberKey;
use crate::module::{Instruction, MethodRecord, Module, OperandValue};

/// Generate a human-readable dump of the module.
pub fn dump(module: &Module) -> String {
    let mut out = String::new();
    let ctx = DumpContext::new(module);

    dump_strings(&mut out, module, &ctx);
    dump_blobs(&mut out, module, &ctx);
    dump_methods(&mut out, module, &ctx);

    out
}

/// Calculate the minimum width needed to display numbers up to `count - 1`.
pub fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

struct DumpContext {
    /// Width for string indices (S#), which are 1-based.
    str_width: usize,
    /// Width for blob indices (B#), which are 1-based.
    blob_width: usize,
}

impl DumpContext {
    fn new(module: &Module) -> Self {
        Self {
            str_width: width_for_count(module.strings().len() + 1),
            blob_width: width_for_count(module.blobs().len() + 1),
        }
    }
}

fn dump_strings(out: &mut String, module: &Module, ctx: &DumpContext) {
    out.push_str("[strings]\n");
    for (i, s) in module.strings().iter().enumerate() {
        let w = ctx.str_width;
        writeln!(out, "S{:0w$} {:?}", i + 1, s).unwrap();
    }
    out.push('\n');
}

fn dump_blobs(out: &mut String, module: &Module, ctx: &DumpContext) {
    out.push_str("[blobs]\n");
    for (i, blob) in module.blobs().iter().enumerate() {
        let w = ctx.blob_width;
        let hex: Vec<String> = blob.iter().map(|b| format!("{b:02x}")).collect();
        writeln!(out, "B{:0w$} = [{}]", i + 1, hex.join(" ")).unwrap();
    }
    out.push('\n');
}

fn dump_methods(out: &mut String, module: &Module, ctx: &DumpContext) {
    out.push_str("[methods]\n");
    for (i, method) in module.methods().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        dump_method(out, module, ctx, method);
    }
}

fn dump_method(out: &mut String, module: &Module, ctx: &DumpContext, method: &MethodRecord) {
    let sig = method.signature;
    writeln!(
        out,
        "{} (args {}{})",
        member(module, method.key),
        sig.arg_count,
        if sig.returns_value { ", returns" } else { "" }
    )
    .unwrap();

    let step_width = width_for_count(method.instructions.len());
    for (pos, instr) in method.instructions.iter().enumerate() {
        let operand = format_operand(module, ctx, instr, step_width);
        let line = format!("  {:0step_width$}  {:<14}{}", pos, instr.code.mnemonic(), operand);
        writeln!(out, "{}", line.trim_end()).unwrap();
    }
}

fn format_operand(module: &Module, ctx: &DumpContext, instr: &Instruction, step_width: usize) -> String {
    match instr.operand() {
        OperandValue::None => String::new(),
        OperandValue::Integer(v) => v.to_string(),
        OperandValue::Float(v) => format!("{v:?}"),
        OperandValue::String(id) => match id.and_then(|id| module.string(id).map(|s| (id, s))) {
            Some((id, s)) => format!("S{:0w$} {:?}", id.get(), s, w = ctx.str_width),
            None => format!("S? {:#x}", instr.raw),
        },
        OperandValue::Target(pos) => format!("{pos:0step_width$}"),
        OperandValue::Targets(id) => {
            let Some(id) = id else {
                return format!("B? {:#x}", instr.raw);
            };
            let targets = module
                .switch_targets(id)
                .map(|ts| {
                    ts.iter()
                        .map(|t| format!("{t:0step_width$}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_else(|| "?".to_string());
            format!("B{:0w$} ({})", id.get(), targets, w = ctx.blob_width)
        }
        OperandValue::Member(key) => member(module, key),
        OperandValue::Variable(slot) => format!("V{slot}"),
        OperandValue::Signature(raw) => format!("{raw:#018x}"),
    }
}

fn member(module: &Module, key: MemberKey) -> String {
    module
        .member_name(key)
        .unwrap_or_else(|| format!("<{:#018x}>", key.0))
}
