mod chrom_sizes;
mod grouping;
mod io_utils;
mod readers;
mod table;
mod trio_name;

pub use chrom_sizes::ChromSizes;
pub use grouping::group_in_order;
pub use io_utils::{format_number_with_commas, open_table_writer, TableWriter};
pub use readers::open_table_reader;
pub use table::{Delimiter, TableHeader};
pub use trio_name::TrioName;

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
