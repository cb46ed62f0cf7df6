use std::io::{self, BufWriter, Write};

use anyhow::Context;
use fs_err as fs;
use rectpack::{auto_pack_multiple, auto_pack_single};

use crate::{
    commands::resolve_packer,
    data::{Layout, PackJob},
    options::PackOptions,
};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let job = PackJob::read_from_file(&options.job)?;
    let layout = run_job(&job)?;

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut file = BufWriter::new(fs::File::create(path)?);
            serde_json::to_writer_pretty(&mut file, &layout)?;
            file.flush()?;

            log::info!("Wrote layout for \"{}\" to {}", job.name, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &layout)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

pub fn run_job(job: &PackJob) -> anyhow::Result<Layout> {
    let mut packer = resolve_packer(job.algorithm.as_deref())?;
    let algorithm = packer.name();
    let sizes = job.sizes();

    log::trace!(
        "Packing {} rectangles for \"{}\" with {}",
        sizes.len(),
        job.name,
        algorithm
    );

    let layout = match job.bin_size() {
        Some(bin_size) => {
            let packing = auto_pack_multiple(&mut packer, bin_size, &sizes)
                .with_context(|| format!("could not pack \"{}\"", job.name))?;

            Layout::from_multiple(job.name.clone(), algorithm, &sizes, &packing)
        }
        None => {
            let packing = auto_pack_single(&mut packer, &sizes)
                .with_context(|| format!("could not pack \"{}\"", job.name))?;

            Layout::from_single(job.name.clone(), algorithm, &sizes, &packing)
        }
    };

    Ok(layout)
}
