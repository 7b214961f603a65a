/// Unit test harness for the completion engine, statistics and codec
mod codec_tests;
mod engine_tests;
