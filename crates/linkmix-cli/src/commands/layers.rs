use super::{load_structure, save_structure};
use crate::cli::LayersArgs;
use crate::error::Result;
use linkmix::workflows::layers::extract_layers;
use tracing::info;

pub fn run(args: LayersArgs) -> Result<()> {
    let structure = load_structure(&args.input)?;
    info!(select = ?&*args.select, c_divisor = args.c_divisor, "Extracting layers.");

    let extracted = extract_layers(&structure, &args.select, args.c_divisor)?;
    save_structure(&extracted, &args.output)?;

    println!(
        "Extracted {} atoms from {} layer(s) to: {}",
        extracted.natom(),
        args.select.len(),
        args.output.display()
    );
    Ok(())
}
