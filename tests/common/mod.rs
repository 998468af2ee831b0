use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a purchases CSV with `rows` valid orders, numbered from 1.
pub fn generate_purchases_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["order_id", "amount", "transaction_id", "return_url", "cancel_url"])?;

    for i in 1..=rows {
        wtr.write_record([
            i.to_string().as_str(),
            "10.00",
            format!("TXN-{i}").as_str(),
            "",
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
