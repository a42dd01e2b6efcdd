pub mod discriminator;
pub mod instruction;
pub mod pda;
pub mod state;

pub use discriminator::{account_discriminator, instruction_discriminator};
pub use pda::get_global_pda;
pub use state::{fetch_global, Global};
