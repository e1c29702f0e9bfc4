mod test_apply;
mod test_fill;
