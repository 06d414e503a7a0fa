use crate::error::Result;
use crate::mapping::DEFAULT_CATEGORIES;

pub fn run() -> Result<()> {
    for name in DEFAULT_CATEGORIES {
        println!("{name}");
    }
    Ok(())
}
