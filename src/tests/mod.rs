#[cfg(all(feature = "fastrand", feature = "std"))]
mod roller;
