pub mod etag;
