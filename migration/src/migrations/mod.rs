pub mod m202410160001_create_counters;
pub mod m202410160002_create_users;
pub mod m202410160003_create_topics;
pub mod m202410160004_create_queues;
pub mod m202410160005_create_configs;
