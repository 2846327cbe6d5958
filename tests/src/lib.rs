//! End-to-end tests driving the real HTTP client against an in-process
//! inventory endpoint.

#[cfg(test)]
mod stub;
#[cfg(test)]
mod sweep;
