//! Convert VM descriptions to engine XML
//!
//! Reads a YAML or JSON file (chosen by extension, YAML otherwise) holding
//! either one VM or a list of VMs and prints the XML request body to stdout.
//!
//! Environment:
//! - `OVIRT_XML_INDENT`: spaces per level, 0 for single-line output (default 0)
//! - `OVIRT_XML_DECLARATION`: `true` to emit the XML declaration (default false)

use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result, bail};
use ovirt_xml::{Vm, WriterConfig, XmlWriter, write_many, write_one};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
    Many(Vec<Vm>),
    One(Box<Vm>),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: vm2xml <file.yaml|file.json>");
    };
    let config = load_config()?;
    debug!(?config, "Writer configuration");

    let input = read_input(&path)?;

    let stdout = std::io::stdout();
    let mut writer = XmlWriter::new(stdout.lock(), &config)?;
    match &input {
        Input::One(vm) => {
            write_one(&mut writer, Some(vm.as_ref()), None)?;
            info!(name = vm.name.as_deref().unwrap_or(""), "Wrote VM");
        }
        Input::Many(vms) => {
            write_many(&mut writer, vms, None, None)?;
            info!(count = vms.len(), "Wrote VMs");
        }
    }
    let mut out = writer.into_inner();
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

fn load_config() -> Result<WriterConfig> {
    let mut config = WriterConfig::compact();
    if let Ok(indent) = env::var("OVIRT_XML_INDENT") {
        let indent: usize = indent
            .parse()
            .with_context(|| format!("OVIRT_XML_INDENT must be a number, got {indent:?}"))?;
        config = config.with_indent(Some(indent));
    }
    if let Ok(declaration) = env::var("OVIRT_XML_DECLARATION") {
        let declaration: bool = declaration
            .parse()
            .with_context(|| format!("OVIRT_XML_DECLARATION must be true or false, got {declaration:?}"))?;
        config = config.with_declaration(declaration);
    }
    Ok(config)
}

fn read_input(path: &Path) -> Result<Input> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let input = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?,
        _ => serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?,
    };
    Ok(input)
}
