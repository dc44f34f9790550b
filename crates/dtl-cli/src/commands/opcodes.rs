use std::fmt::Write;

use dtl_dvi::{CommandKind, OpcodeDescriptor, OpcodeTable};

pub struct OpcodesArgs {
    pub json: bool,
}

pub fn run(args: OpcodesArgs) {
    let table = match OpcodeTable::standard() {
        Ok(table) => table,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&table.iter().collect::<Vec<_>>()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render_table(table.iter()));
    }
}

/// One row per opcode: number, mnemonic, payload kind, then the fixed
/// argument widths. Negative widths are signed.
pub fn render_table<'a>(descriptors: impl IntoIterator<Item = &'a OpcodeDescriptor>) -> String {
    let mut out = String::new();
    for d in descriptors {
        let args: Vec<String> = d.args.iter().map(ToString::to_string).collect();
        let line = format!(
            "{:>3}  {:<10} {:<10} {}",
            d.opcode,
            d.name,
            kind_label(d.kind),
            args.join(" ")
        );
        writeln!(out, "{}", line.trim_end()).expect("String write never fails");
    }
    out
}

fn kind_label(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::SetChar(_) => "char",
        CommandKind::Fixed => "fixed",
        CommandKind::FontNum(_) => "font",
        CommandKind::Special(_) => "special",
        CommandKind::FontDef(_) => "font_def",
        CommandKind::Pre => "pre",
        CommandKind::Post => "post",
        CommandKind::PostPost => "post_post",
        CommandKind::Undefined => "undefined",
    }
}
