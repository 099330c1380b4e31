#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use graspkit_calib as calib;

#[doc(inline)]
pub use graspkit_3d as g3d;

#[doc(inline)]
pub use graspkit_pose as pose;

#[doc(inline)]
pub use graspkit_plan as plan;
