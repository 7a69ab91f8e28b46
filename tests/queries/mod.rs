mod tests_properties;
