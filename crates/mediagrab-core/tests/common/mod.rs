pub mod job_server;
