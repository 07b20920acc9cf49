//! Capital signals: where money is going.
//!
//! Both are quarterly at the source. Revenue per employee is a level and is
//! replicated across months; venture funding is a flow and is divided.

mod rev_per_employee;
mod vc_funding;

pub use rev_per_employee::{RevPerEmployeeConfig, RevPerEmployeeExtractor};
pub use vc_funding::VcFundingExtractor;
