mod extraction_result_test;
mod pipeline_context_test;
