mod auth;
mod health_test;
mod queues_test;
