use std::process::ExitCode;

use owlgen_core::SpecKind;

fn main() -> ExitCode {
    owlgen::genmain(SpecKind::Msg)
}
