//! CRD generation binary
//!
//! Prints every VM-operator CRD as a multi-document YAML stream, or writes
//! one file per CRD when an output directory is given as the first argument
//! or in `CRDGEN_OUTPUT_DIR`.

use std::path::PathBuf;
use std::{env, fs};

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let output_dir = env::args()
        .nth(1)
        .or_else(|| env::var("CRDGEN_OUTPUT_DIR").ok())
        .map(PathBuf::from);

    let crds = vm_operator_api::crds();
    info!("Generating {} CRDs", crds.len());

    match output_dir {
        Some(dir) => {
            fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
            for crd in &crds {
                let name = crd.metadata.name.as_deref().unwrap_or("unnamed");
                let path = dir.join(format!("{name}.yaml"));
                let yaml = serde_yaml::to_string(crd).with_context(|| format!("serializing {name}"))?;
                fs::write(&path, yaml).with_context(|| format!("writing {}", path.display()))?;
                info!("  Wrote {}", path.display());
            }
        }
        None => {
            for crd in &crds {
                debug!("Serializing {:?}", crd.metadata.name);
                print!("---\n{}", serde_yaml::to_string(crd)?);
            }
        }
    }

    Ok(())
}
