#[cfg(test)]
mod ide;
