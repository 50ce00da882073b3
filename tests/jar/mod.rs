//! Class-file reader and JAR walker, end to end through real archives.

mod tests_read_jar;
