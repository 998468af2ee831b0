pub mod purchase_reader;
pub mod result_writer;
