pub mod inspect;
pub mod parse;
#[cfg(test)]
mod tests;
