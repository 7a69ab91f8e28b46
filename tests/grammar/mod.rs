mod tests_builder;
