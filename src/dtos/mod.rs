pub mod campaigndtos;
pub mod listdtos;
pub mod milestonedtos;
pub mod pagedtos;
pub mod sequencedtos;
pub mod subscriberdtos;

pub use campaigndtos::*;
pub use listdtos::*;
pub use milestonedtos::*;
pub use pagedtos::*;
pub use sequencedtos::*;
pub use subscriberdtos::*;
