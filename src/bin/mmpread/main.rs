use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use mmpio::read::{
    register_record_parser, MmpReader, Record, RecordError, RecordParser, ReadSession,
};
use mmpio::{NodeData, NodeId, Part};

mod cli;

/// `comment` records carry free-form user text for the part editor; a
/// read-only inspector accepts them without keeping the body.
struct CommentParser;

impl RecordParser for CommentParser {
    fn read_record(
        &self,
        _session: &mut ReadSession,
        _record: &Record<'_>,
    ) -> Result<(), RecordError> {
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    register_record_parser("comment", |_| Box::new(CommentParser));

    let file = File::open(&cli.input)
        .with_context(|| format!("cannot open {}", cli.input.display()))?;
    let mut reader = MmpReader::new(BufReader::new(file));

    let bar = if cli.quiet {
        None
    } else {
        let bar = ProgressBar::new(0).with_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} lines")
                .context("bad progress template")?,
        );
        let sink = bar.clone();
        reader = reader.progress(move |done, total| {
            sink.set_length(total as u64);
            sink.set_position(done as u64);
        });
        Some(bar)
    };

    let outcome = reader
        .read()
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    for msg in outcome.log.iter() {
        eprintln!("{msg}");
    }

    let part = &outcome.part;
    println!("{}", cli.input.display());
    if let Some(version) = &part.format_version {
        println!("  format:      {version}");
    }
    if let Some(kelvin) = part.temperature {
        println!("  temperature: {kelvin} K");
    }
    println!("  atoms:       {}", part.atom_count());
    println!("  bonds:       {}", part.bond_count());

    if cli.tree {
        println!();
        for root in part.roots() {
            print_tree(part, root, 0);
        }
    }
    Ok(())
}

fn print_tree(part: &Part, node: NodeId, depth: usize) {
    println!("{:indent$}{}", "", label(part, node), indent = depth * 2);
    for &child in part.nodes.children(node) {
        print_tree(part, child, depth + 1);
    }
}

fn label(part: &Part, node: NodeId) -> String {
    match part.nodes.data(node) {
        NodeData::Group(g) => format!("group ({})", g.name),
        NodeData::Chunk(c) => format!("mol ({}) [{} atoms]", c.name, c.atoms.len()),
        NodeData::Jig(j) => format!("jig ({})", j.name),
        NodeData::View(v) => format!("view ({})", v.name),
        NodeData::Marker(id) => format!("marker ({id})"),
    }
}
