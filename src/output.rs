//! Particle snapshot output.

use crate::error::Result;
use crate::solver::Particle;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one particle snapshot.
///
/// The file is named `<output_path>.csv.<step>` and holds the fixed header
/// `x, y, z, velocity magnitude` followed by one line per particle in storage
/// order. The file is fully written and closed before returning.
pub fn write_snapshot(output_path: &Path, step: usize, particles: &[Particle]) -> Result<()> {
    let filename = format!("{}.csv.{}", output_path.display(), step);
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "x, y, z, velocity magnitude")?;

    for p in particles {
        writeln!(
            file,
            "{}, {}, {}, {}",
            p.position.x,
            p.position.y,
            p.position.z,
            p.velocity.norm()
        )?;
    }

    file.flush()?;
    Ok(())
}
