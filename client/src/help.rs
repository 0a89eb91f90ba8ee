use std::fmt::Write;

use velocio::{Category, Command};

const NAME_WIDTH: usize = 24;

/// Instruction list shown after the option summary.
pub fn instruction_help() -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let _ = writeln!(out, "{}:", category.title());
        for command in Command::ALL.iter().filter(|c| c.category() == category) {
            let _ = writeln!(out, "    {:<NAME_WIDTH$}{}", command.name(), command.description());
        }
        out.push('\n');
    }

    out.push_str("Sending RAW messages:\n");
    let _ = writeln!(out, "    {:<NAME_WIDTH$}{}", "--raw XX YY ZZ", "sends [XX, YY, ZZ]");
    let _ = writeln!(
        out,
        "    {:<NAME_WIDTH$}{}",
        "--raw XX [00,04]",
        "sends with range substitution [XX, 00], [XX, 01], [XX, ...]"
    );
    out.push('\n');

    out.push_str("Examples:\n");
    out.push_str("    ctvelocio play\n");
    out.push_str("    ctvelocio read_output_bits\n");
    out.push_str("    ctvelocio --raw 56 ff ff 00 08 0a 00 [01,0c]\n");
    out
}
