//! JAR in, tiny mapping out: the generator against real archives and files.

mod tests_generate;
mod tests_update;
