pub(crate) mod printer;
#[cfg(test)]
pub(crate) mod virt;
