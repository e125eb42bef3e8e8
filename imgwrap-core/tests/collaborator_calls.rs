//! Exact collaborator call sequences, checked with mocked resources.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use imgwrap_core::{
    AttributeName, AttributeSet, CachedResource, ImageConsumer,
    PresentationConfig, ResourceCache, ResourceStatus, SourceId,
};
use mockall::predicate::eq;
use mockall::{Sequence, mock};

mock! {
    pub Image {}

    impl CachedResource for Image {
        type Handle = u32;

        fn source(&self) -> &SourceId;
        fn status(&self) -> ResourceStatus;
        fn create_clone(&self, attributes: &AttributeSet) -> Option<u32>;
        fn release_clone(&self, clone: u32);
        fn set_clone_attribute(
            &self,
            clone: &u32,
            name: AttributeName,
            value: &str,
        );
        fn remove_clone_attribute(&self, clone: &u32, name: AttributeName);
    }
}

struct FixedCache {
    images: HashMap<SourceId, Arc<MockImage>>,
}

impl FixedCache {
    fn new(images: Vec<MockImage>) -> Self {
        let images = images
            .into_iter()
            .map(|image| (image.source().clone(), Arc::new(image)))
            .collect();
        Self { images }
    }
}

impl ResourceCache for FixedCache {
    type Resource = MockImage;

    fn lookup(&self, source: &SourceId) -> Arc<MockImage> {
        Arc::clone(&self.images[source])
    }
}

fn image(id: &str, status: ResourceStatus) -> MockImage {
    let mut image = MockImage::new();
    image.expect_source().return_const(SourceId::from(id));
    image.expect_status().return_const(status);
    image
}

fn consumer(images: Vec<MockImage>) -> ImageConsumer<FixedCache> {
    ImageConsumer::new(
        Arc::new(FixedCache::new(images)),
        Arc::new(PresentationConfig::default()),
    )
}

#[test]
fn source_change_releases_old_clone_before_creating_new_one() {
    let mut seq = Sequence::new();
    let mut a = image("a.png", ResourceStatus::Ready);
    let mut b = image("b.png", ResourceStatus::Ready);

    a.expect_create_clone()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Some(1));
    a.expect_release_clone()
        .with(eq(1))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    b.expect_create_clone()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Some(2));
    b.expect_release_clone()
        .with(eq(2))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut consumer = consumer(vec![a, b]).with_source("a.png");
    consumer.attach().unwrap();
    assert_eq!(consumer.current_clone(), Some(&1));

    consumer.set_source(Some(SourceId::from("b.png")));
    assert_eq!(consumer.current_clone(), Some(&2));

    consumer.detach();
}

#[test]
fn detach_releases_exactly_once_and_stops_forwarding() {
    let mut a = image("a.png", ResourceStatus::Ready);
    a.expect_create_clone().times(1).returning(|_| Some(7));
    a.expect_set_clone_attribute()
        .withf(|clone, name, value| {
            *clone == 7 && *name == AttributeName::Alt && value == "before"
        })
        .times(1)
        .return_const(());
    a.expect_release_clone()
        .with(eq(7))
        .times(1)
        .return_const(());
    a.expect_remove_clone_attribute().never();

    let mut consumer = consumer(vec![a]).with_source("a.png");
    consumer.attach().unwrap();
    consumer.set_attribute(AttributeName::Alt, "before");

    consumer.detach();
    consumer.detach();
    consumer.set_attribute(AttributeName::Alt, "after");
    consumer.remove_attribute(AttributeName::Alt);
    assert_eq!(consumer.attribute(AttributeName::Alt), None);
}

#[test]
fn failed_clone_creation_is_not_released() {
    let mut a = image("a.png", ResourceStatus::Pending);
    a.expect_create_clone().times(1).returning(|_| None);
    a.expect_release_clone().never();

    let mut consumer = consumer(vec![a]).with_source("a.png");
    consumer.attach().unwrap();
    assert!(!consumer.is_leased());
    assert_eq!(consumer.presentation_tag(), Some("img-loading"));
}

#[test]
fn clone_is_created_with_the_stored_attributes() {
    let mut a = image("a.png", ResourceStatus::Ready);
    a.expect_create_clone()
        .withf(|attributes| {
            attributes.get(AttributeName::Usemap) == Some("#nav")
                && attributes.get(AttributeName::Border) == Some("0")
        })
        .times(1)
        .returning(|_| Some(3));
    a.expect_release_clone()
        .with(eq(3))
        .times(1)
        .return_const(());

    let mut consumer = consumer(vec![a])
        .with_attribute(AttributeName::Usemap, "#nav")
        .with_attribute(AttributeName::Border, "0")
        .with_source("a.png");
    consumer.attach().unwrap();
}

#[test]
fn repeated_attach_retries_a_failed_clone_creation() {
    let mut seq = Sequence::new();
    let mut a = image("a.png", ResourceStatus::Ready);
    a.expect_create_clone()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| None);
    a.expect_create_clone()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Some(9));
    a.expect_release_clone()
        .with(eq(9))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let inserted = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&inserted);
    let mut consumer = consumer(vec![a])
        .on_insert(move |clone| seen.borrow_mut().push(*clone))
        .with_source("a.png");

    consumer.attach().unwrap();
    assert!(!consumer.is_leased());
    assert!(inserted.borrow().is_empty());

    consumer.attach().unwrap();
    assert_eq!(consumer.current_clone(), Some(&9));
    assert_eq!(*inserted.borrow(), vec![9]);

    consumer.detach();
}
