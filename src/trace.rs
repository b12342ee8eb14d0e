//! Human readable rendering of a run: per-step frames with index, tape and head rows, the
//! banners framing a verbose run, and the verbose illegal-input report.
//!
//! Everything here only reads machine state.

use crate::machine::TuringMachine;
use crate::tape::Tape;
use crate::types::{Halt, Step};
use std::io::{self, Write};

/// Separator printed after every frame.
pub const FRAME_RULE: &str = "---------------------------------------------";

/// Returns a banner line such as `==================== RUN ====================`.
pub fn banner(title: &str) -> String {
    let bar = "=".repeat(20);
    format!("{bar} {title} {bar}")
}

/// Renders the configuration the machine is in before its next step attempt.
pub fn render_step(machine: &TuringMachine) -> String {
    let mut frame = format!(
        "Step   : {}\nState  : {}\n",
        machine.step_count(),
        machine.state()
    );

    for (i, tape) in machine.tapes().iter().enumerate() {
        frame.push_str(&render_tape(i, tape));
    }
    frame.push_str(FRAME_RULE);
    frame.push('\n');

    frame
}

/// Renders the index, tape and head rows of tape `i`.
///
/// Every cell is as wide as its index plus one leading space; the symbol and the head marker sit
/// right after that space. Indices are shown without sign.
pub fn render_tape(i: usize, tape: &Tape) -> String {
    let mut index = String::new();
    let mut symbols = String::new();
    let mut head = String::new();

    for (position, symbol, is_head) in tape.window() {
        let label = position.unsigned_abs().to_string();
        let pad = " ".repeat(label.len() - 1);

        index.push(' ');
        index.push_str(&label);
        symbols.push(' ');
        symbols.push(symbol);
        symbols.push_str(&pad);
        head.push(' ');
        head.push(if is_head { '^' } else { ' ' });
        head.push_str(&pad);
    }

    // Labels lose one space of padding once the tape number has two digits.
    let (gap, wide) = if i < 10 { (" ", "  ") } else { ("", " ") };
    format!("Index{i}{gap}:{index}\nTape{i}{wide}:{symbols}\nHead{i}{wide}:{head}\n")
}

/// Runs the machine to a halt, writing the verbose trace of every step to `out`.
///
/// The `Result` footer is only written when the machine halts normally.
pub fn trace_run<W: Write>(
    machine: &mut TuringMachine,
    input: &str,
    out: &mut W,
) -> io::Result<Step> {
    writeln!(out, "Input: {input}")?;
    writeln!(out, "{}", banner("RUN"))?;

    let mut written = Ok(());
    let step = machine.run_with(|m| {
        if written.is_ok() {
            written = out.write_all(render_step(m).as_bytes());
        }
    });
    written?;

    if step == Step::Halt(Halt::Ok) {
        writeln!(out, "Result: {}", machine.output())?;
        writeln!(out, "{}", banner("END"))?;
    }

    Ok(step)
}

/// Renders the verbose report for an input character outside the input alphabet.
pub fn render_illegal_input(input: &str, symbol: char, position: usize) -> String {
    let caret = " ".repeat("Input: ".len() + position);
    format!(
        "Input: {input}\n{}\nerror: '{symbol}' was not declared in the set of input symbols\nInput: {input}\n{caret}^\n{}\n",
        banner("ERR"),
        banner("END"),
    )
}
