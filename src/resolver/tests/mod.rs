mod tests_propagation;
