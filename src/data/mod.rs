pub mod episode_links;
