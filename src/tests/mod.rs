mod site_store;
mod workflow;
