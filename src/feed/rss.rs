//! RSS 2.0 mapping.

use super::{RawFeed, RawFeedItem, non_empty};
use crate::utils::date::parse_feed_date;
use ::rss::{Channel, Item};

pub(super) fn parse(bytes: &[u8]) -> Result<RawFeed, ::rss::Error> {
    Channel::read_from(bytes).map(|channel| from_channel(&channel))
}

fn from_channel(channel: &Channel) -> RawFeed {
    let itunes = channel.itunes_ext();

    let description = non_empty(Some(channel.description()))
        .or_else(|| itunes.and_then(|ext| non_empty(ext.summary())))
        .unwrap_or_default();
    let image_url = channel
        .image()
        .and_then(|image| non_empty(Some(image.url())))
        .or_else(|| itunes.and_then(|ext| non_empty(ext.image())))
        .map(str::to_owned);

    RawFeed {
        title: channel.title().to_owned(),
        description: description.to_owned(),
        link: channel.link().to_owned(),
        published: channel.pub_date().unwrap_or_default().to_owned(),
        image_url,
        items: channel.items().iter().map(from_item).collect(),
    }
}

fn from_item(item: &Item) -> RawFeedItem {
    let description = non_empty(item.description())
        .or_else(|| item.itunes_ext().and_then(|ext| non_empty(ext.summary())))
        .unwrap_or_default();

    // Dublin Core date stands in for a missing pubDate
    let published = non_empty(item.pub_date())
        .or_else(|| {
            item.dublin_core_ext()
                .and_then(|dc| dc.dates().first())
                .map(String::as_str)
        })
        .unwrap_or_default();

    RawFeedItem {
        title: item.title().unwrap_or_default().to_owned(),
        description: description.to_owned(),
        link: item.link().unwrap_or_default().to_owned(),
        published: published.to_owned(),
        published_parsed: parse_feed_date(published),
        duration: item
            .itunes_ext()
            .and_then(|ext| ext.duration())
            .map(str::to_owned),
    }
}
