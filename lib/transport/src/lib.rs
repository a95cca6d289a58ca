mod mqtt;
pub use mqtt::connect_mqtt;

mod topic;
pub use topic::Topic;
